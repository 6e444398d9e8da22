use linkkeeper_backend::auth::{
    hash_password, random_string, verify_password, MAX_SALT_LENGTH, MIN_SALT_LENGTH,
};

#[test]
fn test_password_hashing_and_verification() {
    let stored = hash_password("hunter2");

    assert!((MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&stored.salt.len()));
    assert_eq!(stored.hash.len(), 128);
    assert!(stored.hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    assert!(verify_password("hunter2", &stored.salt, &stored.hash));
    assert!(!verify_password("hunter3", &stored.salt, &stored.hash));
    assert!(!verify_password("Hunter2", &stored.salt, &stored.hash));
}

#[test]
fn test_same_password_gets_fresh_salt() {
    let first = hash_password("correct horse battery staple");
    let second = hash_password("correct horse battery staple");

    assert_ne!(first.hash, second.hash);
    assert!(verify_password("correct horse battery staple", &first.salt, &first.hash));
    assert!(verify_password("correct horse battery staple", &second.salt, &second.hash));
}

#[test]
fn test_salt_is_bound_to_hash() {
    let stored = hash_password("secret");
    let other_salt = format!("{}x", stored.salt);
    assert!(!verify_password("secret", &other_salt, &stored.hash));
}

#[test]
fn test_unicode_password() {
    let stored = hash_password("pässwörd-密码");
    assert!(verify_password("pässwörd-密码", &stored.salt, &stored.hash));
    assert!(!verify_password("passwort-密码", &stored.salt, &stored.hash));
}

#[test]
fn test_salt_length_spread() {
    let mut seen = [false; MAX_SALT_LENGTH + 1];
    for _ in 0..2000 {
        let stored = hash_password("x");
        assert!(stored.salt.chars().all(|c| c.is_ascii_alphabetic()));
        seen[stored.salt.len()] = true;
    }
    assert!(seen[MIN_SALT_LENGTH..=MAX_SALT_LENGTH].iter().all(|s| *s));
}

#[test]
fn test_random_string_alphabet() {
    let s = random_string(500);
    assert_eq!(s.len(), 500);
    assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
    assert!(s.chars().any(|c| c.is_ascii_uppercase()));
    assert!(s.chars().any(|c| c.is_ascii_lowercase()));
    assert_eq!(random_string(0), "");
}
