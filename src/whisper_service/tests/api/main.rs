mod accept_messages;
mod messages;
mod sign_in;
mod sign_out;
mod sign_up;
mod suggest_messages;
mod verify_code;
