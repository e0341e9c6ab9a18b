pub const REDACTED: &str = "*****";

/// Printable form of a command with the credential values redacted.
#[must_use]
pub fn sanitize_command(tokens: &[String], username: &str, password: &str) -> String {
    mask_credentials(&tokens.join(" "), username, password)
}

/// Replaces `<password>,` and then `<username>,` with `*****,`. An empty value
/// is skipped; it would otherwise match before every comma.
#[must_use]
pub fn mask_credentials(text: &str, username: &str, password: &str) -> String {
    let masked = mask_value(text, password);
    mask_value(&masked, username)
}

fn mask_value(text: &str, value: &str) -> String {
    if value.is_empty() {
        return text.to_string();
    }

    text.replace(&format!("{value},"), &format!("{REDACTED},"))
}
