//! Paths of the portal API, relative to the server root.

pub const TOKEN: &str = "/token";
pub const REGISTER: &str = "/register";
pub const CURRENT_USER: &str = "/users/me";
pub const ASSIGNMENTS: &str = "/assignments";
pub const MY_ASSIGNMENTS: &str = "/my-assignments";
pub const ANSWERS: &str = "/answers";
pub const COMMENTS: &str = "/comments";
pub const NOTIFICATIONS: &str = "/notifications";

pub fn answer_grade(answer_id: i64) -> String {
    format!("{ANSWERS}/{answer_id}/grade")
}

pub fn answer_comments(answer_id: i64) -> String {
    format!("{ANSWERS}/{answer_id}/comments")
}

pub fn notification_read(notification_id: i64) -> String {
    format!("{NOTIFICATIONS}/{notification_id}/read")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterized_paths() {
        assert_eq!(answer_grade(4), "/answers/4/grade");
        assert_eq!(answer_comments(9), "/answers/9/comments");
        assert_eq!(notification_read(12), "/notifications/12/read");
    }
}
