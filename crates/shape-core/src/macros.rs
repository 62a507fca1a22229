/// Macro to return early with an unsupported-construct error located at `$span`
#[macro_export]
macro_rules! unsupported {
    ($span:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unsupported(format!($($arg)*), $span))
    };
}
