fn main() {
    // ESP-IDF link arguments only matter for the firmware image; host builds
    // (unit and integration tests) have nothing to pick up.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
