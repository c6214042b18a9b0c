use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Underspecified interval: neither an end time nor a positive duration was given")]
    UnderspecifiedInterval,

    #[error(
        "Inconsistent timing: supplied duration of {supplied} minutes does not match the implied duration of {implied} minutes"
    )]
    InconsistentTiming { supplied: i64, implied: i64 },

    #[error("Invalid interval: start time must be before end time")]
    InvalidInterval,

    #[error("Parse error: {0}")]
    Parse(#[from] chrono::ParseError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
