//! Data models for the docshare API.
//!
//! This module contains all the data structures used to represent
//! API payloads:
//! - `auth`: login, OTP and registration requests, user profile
//! - `document`: shared documents, search pages and ratings

pub mod auth;
pub mod document;

pub use auth::{
    AuthResponse, LoginRequest, OtpRequest, OtpSent, RegisterCompleteRequest, UserProfile,
    UserRole, VerifyOtpRequest,
};
pub use document::{Document, DocumentPage, DocumentStatus, RatingRequest, RatingSummary};
