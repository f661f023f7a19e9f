#[macro_export]
macro_rules! browse_print {
    ($message:expr) => {
        eprintln!(
            "{} {}",
            $crate::internal::user_interface::StringColor::light_cyan("gitlab-browse:"),
            $message
        )
    };
}

#[macro_export]
macro_rules! browse_info {
    ($message:expr) => {
        $crate::browse_print!($message)
    };
}

#[macro_export]
macro_rules! browse_warning {
    ($message:expr) => {
        $crate::browse_print!(format!(
            "{} {}",
            $crate::internal::user_interface::StringColor::yellow("warning:"),
            $message
        ))
    };
}

#[macro_export]
macro_rules! browse_error {
    ($message:expr) => {
        $crate::browse_print!(format!(
            "{} {}",
            $crate::internal::user_interface::StringColor::red("error:"),
            $message
        ))
    };
}
