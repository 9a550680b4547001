fn main() {
    // ESP-IDF toolchain environment is only needed for the firmware image;
    // host builds (tests, docs) skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
