use super::*;
use serial_test::serial;

#[test]
#[serial]
fn default_threads_honours_env_override() {
    unsafe { std::env::set_var(PROGRAM_THREADS, "3") };
    assert_eq!(default_threads(), 3);

    unsafe { std::env::set_var(PROGRAM_THREADS, " 12 ") };
    assert_eq!(default_threads(), 12);

    unsafe { std::env::remove_var(PROGRAM_THREADS) };
}

#[test]
#[serial]
fn default_threads_ignores_invalid_env_values() {
    for bad in ["0", "-2", "many", ""] {
        unsafe { std::env::set_var(PROGRAM_THREADS, bad) };

        let n = default_threads();
        assert!(n >= 1, "env {:?} should fall back to a positive count", bad);
    }

    unsafe { std::env::remove_var(PROGRAM_THREADS) };
}

#[test]
fn default_scan_root_is_not_empty() {
    let root = default_scan_root();
    assert!(!root.as_os_str().is_empty());
}
