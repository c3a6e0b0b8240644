pub mod accept_messages;
pub mod check_username;
pub mod delete_message;
pub mod list_messages;
pub mod login;
pub mod logout;
pub mod register;
pub mod send_message;
pub mod suggest_messages;
pub mod verify_account;
