//! # presence-service
//!
//! Application layer: the user directory, the presence toggle, and the
//! authentication flows around them.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, CheckStatus, CurrentUserResponse, DirectoryResponse, HealthChecks,
    HealthResponse, LoginRequest, LogoutRequest, PresenceResponse, ReadinessResponse,
    RefreshTokenRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};

pub use services::{
    AuthService, AuthSession, DirectoryService, HealthService, PresenceService, SeedReport,
    SeedService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
    DEFAULT_SEED_COUNT,
};
