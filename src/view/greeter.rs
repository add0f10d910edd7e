// Greeter service module
// Stateless demo service invoked from the template layer, never from handlers

/// Stateless greeting service.
///
/// Wired into the renderer at construction time and exposed to templates as
/// the `greet(...)` function. No handler calls it directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greeter;

impl Greeter {
    pub fn greet(self, name: &str) -> String {
        format!("Hello {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greet() {
        let greeter = Greeter::default();
        assert_eq!(greeter.greet("Spring!"), "Hello Spring!");
        assert_eq!(greeter.greet(""), "Hello ");
    }
}
