//! Data transfer objects for API requests and responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, CheckStatus, CurrentUserResponse, DirectoryResponse, HealthChecks,
    HealthResponse, PresenceResponse, ReadinessResponse, UserResponse,
};
