use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use anyhow::bail;
    use clap::{Parser, Subcommand};
    use lamina::{
        io::{parse_ron_file, write_ron_file},
        material::{MaterialDescriptor, MaterialGenerator, MaterialGeneratorConfig, MaterialLibrary},
    };
    use std::{path::PathBuf, sync::Arc};

    #[derive(Debug, Parser)]
    #[command(about = "Layered material shader composition", long_about = None)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Generate the passes of a material and print them
        Generate {
            /// Path to RON file with the material descriptor
            #[arg(short, long)]
            material: PathBuf,
            /// Path to RON configuration file to use
            #[arg(short, long)]
            config: Option<PathBuf>,
            /// Paths to RON files with lists of materials that layers can
            /// reference by name
            #[arg(short, long)]
            library: Vec<PathBuf>,
        },
        /// Generate the default configuration file
        GenerateConfig {
            /// Path where the file should be written
            #[arg(short, long)]
            output_path: PathBuf,
            /// Overwrite any existing file at the given path
            #[arg(short, long)]
            force_overwrite: bool,
        },
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        match cli.command {
            Command::Generate {
                material,
                config,
                library,
            } => {
                let config = match config {
                    Some(file_path) => parse_ron_file(file_path)?,
                    None => MaterialGeneratorConfig::default(),
                };

                let mut material_library = MaterialLibrary::new();
                for file_path in library {
                    material_library.load_ron_file(file_path)?;
                }

                let descriptor: MaterialDescriptor = parse_ron_file(material)?;

                let result = MaterialGenerator::new(config)
                    .with_resolver(Arc::new(material_library))
                    .generate(&descriptor);

                for pass in &result.material.passes {
                    println!("{pass}");
                }
                for entry in result.log.entries() {
                    eprintln!("{entry}");
                }

                if result.has_errors() {
                    bail!("Generation of material {} failed", descriptor.name);
                }
                Ok(())
            }
            Command::GenerateConfig {
                output_path,
                force_overwrite,
            } => {
                if !force_overwrite && output_path.exists() {
                    bail!("File {} already exists", output_path.display());
                }
                let config = MaterialGeneratorConfig::default();
                write_ron_file(&config, output_path)
            }
        }
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
