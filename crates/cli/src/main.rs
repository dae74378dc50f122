use anyhow::Result;

fn main() -> Result<()> {
    sectionmeta_cli::main_entry()
}
