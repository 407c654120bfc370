use anyhow::Result;

fn main() -> Result<()> {
    owlmodel_cli::run()
}
