// Session cookie module
// Parses the request Cookie header and formats the Set-Cookie response value

/// Extract the session id carried by `name` from a `Cookie` header value.
pub fn session_id(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Format the `Set-Cookie` value that hands a session id to the client.
pub fn format_set_cookie(name: &str, id: &str) -> String {
    format!("{name}={id}; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_single_cookie() {
        assert_eq!(
            session_id("tour_session=01ABC", "tour_session"),
            Some("01ABC".to_string())
        );
    }

    #[test]
    fn test_session_id_among_other_cookies() {
        let header = "theme=dark; tour_session=01ABC; lang=en";
        assert_eq!(
            session_id(header, "tour_session"),
            Some("01ABC".to_string())
        );
    }

    #[test]
    fn test_session_id_absent_or_wrong_name() {
        assert_eq!(session_id("theme=dark", "tour_session"), None);
        // Prefix of the cookie name must not match.
        assert_eq!(session_id("tour_session_old=x", "tour_session"), None);
    }

    #[test]
    fn test_format_set_cookie() {
        let value = format_set_cookie("tour_session", "01ABC");
        assert!(value.starts_with("tour_session=01ABC"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Path=/"));
    }
}
