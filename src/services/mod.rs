pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{
    CatalogError, CatalogService, DashboardCounts, DramaDetail, DramaOption, DramaQuery,
};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod notifications;
pub use notifications::NotificationLogger;

pub mod writes;
pub use writes::{WriteDispatcher, WriteError, WriteHandle, WriteOp};
