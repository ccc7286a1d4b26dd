fn main() {
    design_lint::cli::run();
}
