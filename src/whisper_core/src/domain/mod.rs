pub mod email;
pub mod ids;
pub mod message;
pub mod password;
pub mod session;
pub mod user;
pub mod username;
pub mod verification;
pub mod verify_code;
