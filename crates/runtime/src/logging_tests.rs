use super::*;
use log::{Level, Metadata, Record};
use serial_test::serial;

fn buffer_logger(level: Level) -> Logger {
    Logger {
        level,
        target: LogTarget::Buffer(Mutex::new(Vec::new())),
    }
}

fn captured(logger: &Logger) -> Vec<String> {
    match &logger.target {
        LogTarget::Buffer(lines) => lines.lock().expect("lock buffer").clone(),
        LogTarget::Stderr => Vec::new(),
    }
}

#[test]
#[serial]
fn get_level_from_env_parses_cases() {
    let cases: &[(Option<&str>, Level)] = &[
        (None, Level::Warn),
        (Some("debug"), Level::Debug),
        (Some("INFO"), Level::Info),
        (Some("warn"), Level::Warn),
        (Some("Error"), Level::Error),
        (Some("trace"), Level::Trace),
        (Some("garbage"), Level::Warn),
        (Some("off"), Level::Warn),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, v) },
            None => unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) },
        }

        let lvl = get_level_from_env();
        assert_eq!(
            lvl, *expected,
            "env {:?} should yield level {:?}, got {:?}",
            value, expected, lvl
        );
    }

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
}

#[test]
fn enabled_respects_level_threshold() {
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for logger_level in levels {
        let logger = buffer_logger(logger_level);

        for record_level in levels {
            let meta = Metadata::builder()
                .level(record_level)
                .target("dirreader_fs::walker")
                .build();

            assert_eq!(
                logger.enabled(&meta),
                record_level <= logger_level,
                "logger level {:?}, record level {:?}",
                logger_level,
                record_level
            );
        }
    }
}

#[test]
fn buffered_lines_carry_level_target_and_message() {
    let logger = buffer_logger(Level::Info);

    let args = format_args!("scan finished");
    let record = Record::builder()
        .level(Level::Info)
        .target("dirreader_fs::scan")
        .args(args)
        .build();
    logger.log(&record);

    let args = format_args!("too chatty");
    let record = Record::builder()
        .level(Level::Debug)
        .target("dirreader_fs::scan")
        .args(args)
        .build();
    logger.log(&record);

    let lines = captured(&logger);
    assert_eq!(lines.len(), 1, "debug record should be filtered out");
    assert!(lines[0].contains("INFO"));
    assert!(lines[0].contains("[dirreader_fs::scan]"));
    assert!(lines[0].ends_with("scan finished"));
}

#[test]
fn stderr_logger_does_not_panic() {
    let logger = Logger {
        level: Level::Info,
        target: LogTarget::Stderr,
    };

    let args = format_args!("hello");
    let record = Record::builder().level(Level::Error).target("t").args(args).build();
    logger.log(&record);
    logger.flush();
}
