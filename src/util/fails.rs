// Fatal exit with a message, for errors nothing upstream can recover from.
#[macro_export]
macro_rules! fatal {
    ($fmt:expr $(, $x:expr)* $(,)?) => {{
        tracing::error!($fmt $(, $x)*);
        panic!("Unhandled error")
    }};
}

// Evaluate a Result, and return the contained Ok if possible,
// else fatal with the provided message
#[macro_export]
macro_rules! fatal_if_err {
    ($eval:expr; $fmt:expr $(, $x:expr)*) => {{
        match $eval {
            Ok(value) => value,
            Err(_) => $crate::fatal!($fmt $(, $x)*),
        }
    }};
}
