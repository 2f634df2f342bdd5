//! Matrix command - print the global orientation matrix for an axis pair

use anyhow::Result;
use clap::Args;

use exor_export::options::global_matrix;
use exor_export::Axis;

#[derive(Args)]
pub struct MatrixArgs {
    /// Forward axis (X, Y, Z, -X, -Y, -Z)
    #[arg(long, allow_hyphen_values = true, default_value = "X")]
    pub forward: Axis,

    /// Up axis (X, Y, Z, -X, -Y, -Z)
    #[arg(long, allow_hyphen_values = true, default_value = "Y")]
    pub up: Axis,
}

pub fn execute(args: MatrixArgs) -> Result<()> {
    let matrix = global_matrix(args.forward, args.up)?;

    println!("forward {} / up {}", args.forward, args.up);
    // Rows, as handed to the host
    for row in matrix.transpose().to_cols_array_2d() {
        println!(
            "  [{:>5.1} {:>5.1} {:>5.1} {:>5.1}]",
            row[0], row[1], row[2], row[3]
        );
    }
    Ok(())
}
