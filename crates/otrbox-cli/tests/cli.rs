use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const FATAL_EXIT_CODE: i32 = 3;

fn otrbox(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_otrbox"))
        .args(args)
        .current_dir(home)
        .env_remove("OTRBOX_HOME")
        .output()
        .expect("failed to run otrbox")
}

fn otrbox_with_home_env(cwd: &Path, home_env: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_otrbox"))
        .args(args)
        .current_dir(cwd)
        .env("OTRBOX_HOME", home_env)
        .output()
        .expect("failed to run otrbox")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn public_key(home: &Path) -> String {
    let output = otrbox(home, &["--myPublicKey"]);
    assert!(output.status.success());
    stdout(&output).trim().to_string()
}

fn field<'a>(output: &'a str, label: &str) -> &'a str {
    output
        .lines()
        .find_map(|line| line.strip_prefix(label))
        .unwrap_or_else(|| panic!("missing {:?} in {:?}", label, output))
}

#[test]
fn first_run_generates_key_files() {
    let home = TempDir::new().unwrap();

    let pk = public_key(home.path());
    assert_eq!(pk.len(), 64);
    assert!(pk.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let pub_file = std::fs::read_to_string(home.path().join("otrbox.pub")).unwrap();
    let prv_file = std::fs::read_to_string(home.path().join("otrbox.prv")).unwrap();
    assert_eq!(pub_file, format!("{}\n", pk));
    assert_eq!(prv_file.len(), 65);
    assert!(prv_file.ends_with('\n'));

    let output = otrbox(home.path(), &["--myPrivateKey"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), prv_file);
}

#[test]
fn existing_keys_are_kept() {
    let home = TempDir::new().unwrap();

    let first = public_key(home.path());
    let private_before = std::fs::read(home.path().join("otrbox.prv")).unwrap();
    let second = public_key(home.path());

    assert_eq!(first, second);
    assert_eq!(
        std::fs::read(home.path().join("otrbox.prv")).unwrap(),
        private_before
    );
}

#[test]
fn alice_to_bob_roundtrip() {
    let alice = TempDir::new().unwrap();
    let bob = TempDir::new().unwrap();
    let alice_pk = public_key(alice.path());
    let bob_pk = public_key(bob.path());

    let output = otrbox(
        alice.path(),
        &["--encrypt", "hello", "--theirPublicKey", &bob_pk],
    );
    assert!(output.status.success(), "{:?}", output);
    let encrypted = stdout(&output);
    assert_eq!(field(&encrypted, "Your Public Key:\t"), alice_pk);
    let ciphertext = field(&encrypted, "Your Encrypted Message:\t").to_string();
    // nonce + tag + "hello"
    assert_eq!(ciphertext.len(), (24 + 16 + 5) * 2);

    let output = otrbox(
        bob.path(),
        &["--decrypt", &ciphertext, "--theirPublicKey", &alice_pk],
    );
    assert!(output.status.success(), "{:?}", output);
    let decrypted = stdout(&output);
    assert_eq!(field(&decrypted, "Your Public Key:\t"), bob_pk);
    assert_eq!(field(&decrypted, "Your PlainTxt Message:\t"), "hello");
}

#[test]
fn key_dir_flag_selects_key_home() {
    let cwd = TempDir::new().unwrap();
    let keys = TempDir::new().unwrap();
    let key_dir = keys.path().to_str().unwrap();

    let output = otrbox(cwd.path(), &["--key-dir", key_dir, "--myPublicKey"]);
    assert!(output.status.success());

    assert!(keys.path().join("otrbox.pub").exists());
    assert!(keys.path().join("otrbox.prv").exists());
    assert!(!cwd.path().join("otrbox.pub").exists());
}

#[test]
fn home_env_selects_key_home() {
    let cwd = TempDir::new().unwrap();
    let keys = TempDir::new().unwrap();
    let home_env = keys.path().to_str().unwrap();

    let output = otrbox_with_home_env(cwd.path(), home_env, &["--myPublicKey"]);
    assert!(output.status.success(), "{:?}", output);
    let pk = stdout(&output).trim().to_string();

    let pub_file = std::fs::read_to_string(keys.path().join("otrbox.pub")).unwrap();
    assert_eq!(pub_file, format!("{}\n", pk));
    assert!(keys.path().join("otrbox.prv").exists());
    assert!(!cwd.path().join("otrbox.pub").exists());
    assert!(!cwd.path().join("otrbox.prv").exists());
}

#[test]
fn key_dir_flag_overrides_home_env() {
    let cwd = TempDir::new().unwrap();
    let env_keys = TempDir::new().unwrap();
    let flag_keys = TempDir::new().unwrap();

    let output = otrbox_with_home_env(
        cwd.path(),
        env_keys.path().to_str().unwrap(),
        &["--key-dir", flag_keys.path().to_str().unwrap(), "--myPublicKey"],
    );
    assert!(output.status.success(), "{:?}", output);

    assert!(flag_keys.path().join("otrbox.pub").exists());
    assert!(!env_keys.path().join("otrbox.pub").exists());
    assert!(!cwd.path().join("otrbox.pub").exists());
}

#[test]
fn empty_home_env_falls_back_to_working_dir() {
    let cwd = TempDir::new().unwrap();

    let output = otrbox_with_home_env(cwd.path(), "", &["--myPublicKey"]);
    assert!(output.status.success(), "{:?}", output);

    assert!(cwd.path().join("otrbox.pub").exists());
    assert!(cwd.path().join("otrbox.prv").exists());
}

#[test]
fn first_run_does_not_warn() {
    let home = TempDir::new().unwrap();

    let output = otrbox(home.path(), &["--myPublicKey"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("WARN"), "{}", stderr);
    assert!(!stderr.contains("No such file"), "{}", stderr);
    assert!(stderr.contains("Generating public and private keys"), "{}", stderr);
}

#[test]
fn corrupt_key_file_warns_and_is_replaced() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("otrbox.pub"), "not a key\n").unwrap();

    let output = otrbox(home.path(), &["--myPublicKey"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARN"), "{}", stderr);
    assert!(stderr.contains("otrbox.pub"), "{}", stderr);

    let pk = stdout(&output).trim().to_string();
    assert_eq!(
        std::fs::read_to_string(home.path().join("otrbox.pub")).unwrap(),
        format!("{}\n", pk)
    );
}

#[test]
fn encrypt_and_decrypt_together_fail() {
    let home = TempDir::new().unwrap();
    let pk = public_key(home.path());

    let output = otrbox(
        home.path(),
        &["--encrypt", "hi", "--decrypt", "00", "--theirPublicKey", &pk],
    );
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not both"));
}

#[test]
fn neither_encrypt_nor_decrypt_fails() {
    let home = TempDir::new().unwrap();

    let output = otrbox(home.path(), &[]);
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("both are blank"));
}

#[test]
fn missing_or_invalid_peer_key_fails() {
    let home = TempDir::new().unwrap();

    let output = otrbox(home.path(), &["--encrypt", "hi"]);
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));

    let output = otrbox(home.path(), &["--encrypt", "hi", "--theirPublicKey", "abcd"]);
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(output.stdout.is_empty());
}

#[test]
fn oversized_message_fails() {
    let home = TempDir::new().unwrap();
    let pk = public_key(home.path());
    let message = "a".repeat(8191);

    let output = otrbox(
        home.path(),
        &["--encrypt", &message, "--theirPublicKey", &pk],
    );
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(output.stdout.is_empty());
}

#[test]
fn tampered_ciphertext_fails() {
    let alice = TempDir::new().unwrap();
    let bob = TempDir::new().unwrap();
    let alice_pk = public_key(alice.path());
    let bob_pk = public_key(bob.path());

    let output = otrbox(
        alice.path(),
        &["--encrypt", "hello", "--theirPublicKey", &bob_pk],
    );
    let encrypted = stdout(&output);
    let mut ciphertext = field(&encrypted, "Your Encrypted Message:\t").to_string();
    let last = ciphertext.pop().unwrap();
    ciphertext.push(if last == '0' { '1' } else { '0' });

    let output = otrbox(
        bob.path(),
        &["--decrypt", &ciphertext, "--theirPublicKey", &alice_pk],
    );
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to decrypt the message"));
}

#[test]
fn unknown_flag_fails_with_fatal_code() {
    let home = TempDir::new().unwrap();

    let output = otrbox(home.path(), &["--bogus"]);
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
}
