//! Request and response types for the educational portal HTTP API.
//!
//! Every type here is a plain DTO: it is received from (or sent to) the
//! server as-is and carries no behavior beyond small accessors.

use serde::{Deserialize, Serialize};

pub mod endpoints;

/// Body returned by `POST /token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Form-encoded body of `POST /token`.
///
/// The server follows the OAuth2 password form, so the email travels in the
/// `username` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// JSON body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub is_teacher: bool,
}

/// The authenticated user as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub is_teacher: bool,
}

impl User {
    pub fn role(&self) -> Role {
        if self.is_teacher {
            Role::Teacher
        } else {
            Role::Student
        }
    }
}

/// Audience a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Teacher,
    Student,
}

/// An assignment as listed for its teacher by `GET /assignments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// An assignment as listed for a student by `GET /my-assignments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// JSON body of `POST /answers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub content: String,
    pub assignment_id: i64,
}

/// Echo of a stored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub content: String,
    pub assignment_id: i64,
}

/// JSON body of `PUT /answers/{id}/grade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRequest {
    pub grade: i32,
}

/// JSON body of `POST /comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
    pub answer_id: i64,
    pub is_teacher: bool,
}

/// A comment attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
    pub answer_id: i64,
    pub is_teacher: bool,
}

/// A notification addressed to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub message: String,
    pub user_id: i64,
    #[serde(default)]
    pub is_read: bool,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
