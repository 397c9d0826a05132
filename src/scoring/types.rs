/// Points and placement awarded to one athlete in one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPoints {
    pub registration_id: String,
    /// 1-indexed competition rank (ties share, next rank skips).
    pub rank: u32,
    pub points: f64,
}
