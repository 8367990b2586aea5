//! Route paths and URL builders.

pub const HOME: &str = "/";
pub const LIST: &str = "/notes/";
pub const ADD: &str = "/add/";
pub const SUCCESS: &str = "/done/";
pub const DETAIL: &str = "/note/{slug}/";
pub const EDIT: &str = "/edit/{slug}/";
pub const DELETE: &str = "/delete/{slug}/";
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const SIGNUP: &str = "/auth/signup/";

pub fn detail(slug: &str) -> String {
    format!("/note/{}/", slug)
}

pub fn edit(slug: &str) -> String {
    format!("/edit/{}/", slug)
}

pub fn delete(slug: &str) -> String {
    format!("/delete/{}/", slug)
}

/// Login entry point that returns the user to `next` afterwards.
pub fn login_with_next(next: &str) -> String {
    format!("{}?next={}", LOGIN, urlencoding::encode(next))
}

/// Returns true if `next` is a path on this site, so redirecting to it
/// after login cannot send the user elsewhere.
///
/// Browsers strip tabs and newlines from a `Location` and treat `\` like
/// `/`, so any of those make the path unsafe.
pub fn is_local_path(next: &str) -> bool {
    if next.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return false;
    }
    next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_note_urls() {
        assert_eq!(detail("qaz"), "/note/qaz/");
        assert_eq!(edit("qaz"), "/edit/qaz/");
        assert_eq!(delete("qaz"), "/delete/qaz/");
    }

    #[test]
    fn login_url_carries_next() {
        assert_eq!(login_with_next("/add/"), "/auth/login/?next=%2Fadd%2F");
    }

    #[test]
    fn login_url_encodes_query_characters() {
        let url = login_with_next("/note/a%26b/?x=1&y=2");
        assert_eq!(url, "/auth/login/?next=%2Fnote%2Fa%2526b%2F%3Fx%3D1%26y%3D2");

        let next = url.strip_prefix("/auth/login/?next=").unwrap();
        assert_eq!(urlencoding::decode(next).unwrap(), "/note/a%26b/?x=1&y=2");
    }

    #[test]
    fn only_local_paths_are_safe() {
        assert!(is_local_path("/notes/"));
        assert!(!is_local_path("https://evil.example/"));
        assert!(!is_local_path("//evil.example/"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path(""));
    }

    #[test]
    fn paths_with_control_characters_are_unsafe() {
        assert!(!is_local_path("/\t/evil.example/"));
        assert!(!is_local_path("/\n/evil.example/"));
        assert!(!is_local_path("/\r\n/evil.example/"));
        assert!(!is_local_path("/ /evil.example/"));
        assert!(!is_local_path("/notes/\u{0}"));
        assert!(is_local_path("/note/a%09b/"));
    }
}
