fn main() {
    println!("cargo:rerun-if-changed=sdkconfig.defaults");

    // Propagate the ESP-IDF build environment only when building firmware;
    // host test builds have no ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
