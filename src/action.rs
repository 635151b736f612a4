#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Refresh,
    ShowDetails,
    ShowHelp,
    ShowDashboard,
    ScrollUp,
    ScrollDown,
    Clear,
    Unknown(char),
    None,
}
