use super::*;

// Each test uses its own variable names so parallel tests never race.

#[test]
fn env_parse_falls_back_on_garbage() {
    let key = "__PF_EP_GARBAGE_127__";
    unsafe { std::env::set_var(key, "ten") };
    assert_eq!(env_parse(key, 10_u64), 10);
    unsafe { std::env::set_var(key, " 42 ") };
    assert_eq!(env_parse(key, 10_u64), 42);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_parse(key, 7_usize), 7);
}

#[test]
fn env_string_ignores_blank_values() {
    let key = "__PF_ES_BLANK_555__";
    unsafe { std::env::set_var(key, "   ") };
    assert_eq!(env_string(key), None);
    unsafe { std::env::set_var(key, "  value ") };
    assert_eq!(env_string(key).as_deref(), Some("value"));
    unsafe { std::env::remove_var(key) };
}
