fn main() {
    promptsite::app::cli::run();
}
