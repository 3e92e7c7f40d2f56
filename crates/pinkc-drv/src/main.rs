fn main() {
    if let Err(e) = pinkc_drv::main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
