pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use use_cases::{
    accept_messages::{AcceptMessagesError, AcceptMessagesUseCase},
    check_username::{CheckUsernameError, CheckUsernameUseCase},
    delete_message::{DeleteMessageError, DeleteMessageUseCase},
    list_messages::{ListMessagesError, ListMessagesUseCase},
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    register::{RegisterError, RegisterOutcome, RegisterUseCase},
    send_message::{SendMessageError, SendMessageUseCase},
    suggest_messages::{SuggestMessagesError, SuggestMessagesUseCase},
    verify_account::{VerifyAccountError, VerifyAccountUseCase},
};
