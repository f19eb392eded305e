/// User interface module
///
/// - View state that the window renders (state.rs)
/// - Auto-dismissing notifications (toast.rs)

pub mod state;
pub mod toast;
