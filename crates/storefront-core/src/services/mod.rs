//! Domain services

pub mod account_service;
pub mod page_data;
pub mod page_loaders;
pub mod session;

pub use account_service::{
    AccountService, LoginForm, ProfileForm, ProfileUpdateResult, RecoverForm, RegisterForm,
    RegisterResult,
};
pub use page_data::{
    fetcher, AssemblerOptions, DeferredHandle, DeferredState, DeferredValue, Fetcher,
    PageDataAssembler, PageDataEnvelope,
};
pub use page_loaders::{LoaderSettings, PageLoaders};
pub use session::CustomerSession;
