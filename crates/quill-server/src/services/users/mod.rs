mod login;
mod profile;
mod register;

pub use self::login::{Login, LoginResult};
pub use self::profile::{ChangePassword, GetProfile, ProfileResult, UpdateProfile};
pub use self::register::{Register, RegisterResult};
