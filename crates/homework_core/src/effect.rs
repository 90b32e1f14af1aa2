#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify { kind: NotificationKind, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    StatusChanged,
    Failure,
}
