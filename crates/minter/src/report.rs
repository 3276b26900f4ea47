// User-facing output

/// Print success message
pub fn success(msg: &str) {
    println!("{}", msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}
