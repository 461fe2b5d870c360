fn main() {
    if let Err(err) = deptree_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
