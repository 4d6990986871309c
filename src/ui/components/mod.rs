mod confirmation_dialog;
mod dialog;
mod history_view;
mod key_hints;
mod member_list;
mod text_input;

pub use confirmation_dialog::{ConfirmationContext, ConfirmationDialog, ConfirmationDialogState};
pub use dialog::DialogFrame;
pub use history_view::HistoryView;
pub use key_hints::KeyHints;
pub use member_list::MemberList;
pub use text_input::TextInputState;
