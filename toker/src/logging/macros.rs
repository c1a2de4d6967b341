//! `log_*!` macros; context values are any `Display` type given as
//! `"key" => value` pairs

/// Build and emit an event only when the global logger wants its level
#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:expr, $event:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::enabled($level) {
            let event = $event $(.with_context($key, $value))*;
            $crate::logging::emit(event);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, line = $line:expr $(, $key:expr => $value:expr)*) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Error,
            $crate::logging::LogEvent::error($code, $message).with_line($line)
            $(, $key => $value)*
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Error,
            $crate::logging::LogEvent::error($code, $message)
            $(, $key => $value)*
        )
    };
}

/// Info-level event carrying a success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Info,
            $crate::logging::LogEvent::success($code, $message)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Info,
            $crate::logging::LogEvent::new($crate::logging::LogLevel::Info, $message)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    (code = $code:expr, $message:expr, line = $line:expr $(, $key:expr => $value:expr)*) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Debug,
            $crate::logging::LogEvent::new($crate::logging::LogLevel::Debug, $message)
                .with_code($code)
                .with_line($line)
            $(, $key => $value)*
        )
    };

    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Debug,
            $crate::logging::LogEvent::new($crate::logging::LogLevel::Debug, $message)
            $(, $key => $value)*
        )
    };
}
