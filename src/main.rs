use clap::Parser;
use log::error;
use mesh_viewer::app;
use mesh_viewer::error::ViewerError;
use mesh_viewer::io::config::Config;
use mesh_viewer::io::geometry_parser::load_mesh;
use std::path::PathBuf;
use std::process::ExitCode;

/// Interactive mesh viewer with Phong, Blinn-Phong and Gouraud shading.
///
/// Both arguments are optional overrides: without them the viewer loads
/// `assets/cube.obj` with the built-in window, camera and lighting setup.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Geometry file with v / vn / f records. Defaults to the bundled cube.
    #[arg(default_value = "assets/cube.obj")]
    mesh: PathBuf,

    /// Optional TOML file overriding window, camera, control and lighting defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ViewerError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let mesh = load_mesh(&cli.mesh)?;
    app::run(&config, &mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_selects_the_builtin_session() {
        let cli = Cli::try_parse_from(["mesh-viewer"]).unwrap();
        assert_eq!(cli.mesh, PathBuf::from("assets/cube.obj"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn overrides_are_accepted() {
        let cli = Cli::try_parse_from(["mesh-viewer", "teapot.obj", "-c", "view.toml"]).unwrap();
        assert_eq!(cli.mesh, PathBuf::from("teapot.obj"));
        assert_eq!(cli.config, Some(PathBuf::from("view.toml")));
    }
}
