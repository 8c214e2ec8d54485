fn main() {
    turtille::cli::run();
}
