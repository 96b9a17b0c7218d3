fn main() -> anyhow::Result<()> {
    webchat_history::run()
}
