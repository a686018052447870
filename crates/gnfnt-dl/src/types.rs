/// Download progress events.
///
/// `total` is taken from the response size header and is `None` when the server does not
/// announce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Starting { total: Option<u64> },
    Chunk { current: u64, total: Option<u64> },
    Complete { total: u64 },
}
