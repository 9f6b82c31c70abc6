fn main() -> anyhow::Result<()> {
    studytrack::cli::run()
}
