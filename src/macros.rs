//===========================================================================//

macro_rules! unsupported {
    ($e:expr) => {
        return Err(crate::error::DecodeError::Unsupported($e.to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err(crate::error::DecodeError::Unsupported(
            format!($fmt, $($arg)+),
        ))
    };
}

macro_rules! invalid_directory {
    ($e:expr) => {
        return Err(crate::error::DecodeError::InvalidDirectory($e.to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err(crate::error::DecodeError::InvalidDirectory(
            format!($fmt, $($arg)+),
        ))
    };
}

//===========================================================================//
