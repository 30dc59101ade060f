/*!
  Plain-text dumps of internal state, printed to stdout. Compiled to nothing unless the `DEBUG`
  feature is enabled. Structured events go through `tracing` instead.
*/

macro_rules! debug_log {
    ($($args:expr),*) => {{
        if cfg!(feature = "DEBUG") {
            $(
                print!("{}", $args);
            )*
        }
    }}
}

macro_rules! debug_logln {
    ($($args:expr),*) => {{
        if cfg!(feature = "DEBUG") {
            $(
                print!("{}", $args);
            )*
            print!("{}", '\n');
        }
    }}
}
