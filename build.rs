fn main() {
    println!("cargo:rerun-if-changed=sdkconfig.defaults");

    // Only the device build links against ESP-IDF; host test builds skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
