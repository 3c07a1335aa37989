//! Tests for argument parsing, output naming and batch processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use std::path::{Path, PathBuf};
    use wavetile::AlgorithmError;
    use wavetile::io::cli::{Cli, FileProcessor, output_path, parse_position, visualization_path};
    use wavetile::io::configuration::{DEFAULT_GRID_WIDTH, DEFAULT_MAX_RETRIES, DEFAULT_SEED};

    fn write_sample(path: &Path) {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([250, 250, 250]));
        img.put_pixel(1, 1, Rgb([10, 10, 10]));
        img.put_pixel(2, 1, Rgb([10, 10, 10]));
        img.put_pixel(3, 3, Rgb([200, 0, 0]));
        img.save(path).expect("save sample");
    }

    // Tests ROW,COL parsing with whitespace
    // Verified by swapping row and column
    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3,7"), Ok([3, 7]));
        assert_eq!(parse_position(" 0 , 12 "), Ok([0, 12]));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
        assert!(parse_position("1,-2").is_err());
    }

    // Tests defaults and repeated start positions
    // Verified by dropping the append action on --start
    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["wavetile", "sample.png"]).expect("parse defaults");
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.width, DEFAULT_GRID_WIDTH);
        assert_eq!(cli.retries, DEFAULT_MAX_RETRIES);
        assert!(cli.start.is_empty());
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_level(), "info");

        let cli = Cli::try_parse_from([
            "wavetile", "in.png", "-w", "9", "-H", "5", "--start", "1,2", "--start", "4,0", "-q",
            "-n", "--verbose",
        ])
        .expect("parse flags");
        assert_eq!(cli.start, vec![[1, 2], [4, 0]]);
        let config = cli.generation_config();
        assert_eq!((config.width, config.height), (9, 5));
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_level(), "debug");

        assert!(Cli::try_parse_from(["wavetile", "in.png", "--start", "oops"]).is_err());
    }

    // Tests output files sit next to the input
    // Verified by dropping the parent directory
    #[test]
    fn test_output_paths() {
        let input = PathBuf::from("dir/tiles.png");
        assert_eq!(output_path(&input), PathBuf::from("dir/tiles_result.png"));
        assert_eq!(
            visualization_path(&input),
            PathBuf::from("dir/tiles_visualization.gif")
        );
    }

    // Tests a full run writes a grid-sized PNG and GIF
    // Verified by exporting before generation finishes
    #[test]
    fn test_process_single_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("sample.png");
        write_sample(&input);

        let cli = Cli::try_parse_from([
            "wavetile",
            input.to_str().expect("utf-8 path"),
            "-w",
            "10",
            "-H",
            "6",
            "-q",
            "-v",
        ])
        .expect("parse");
        FileProcessor::new(cli).process().expect("process");

        let output = image::open(output_path(&input)).expect("output image").to_rgba8();
        assert_eq!(output.dimensions(), (10, 6));
        assert!(output.pixels().all(|p| p.0[3] == 255));
        assert!(visualization_path(&input).exists());
    }

    // Tests directory mode skips existing outputs and generated files
    // Verified by reprocessing results as samples
    #[test]
    fn test_process_directory_skips_outputs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("a.png");
        write_sample(&input);

        let args = |extra: &[&str]| {
            let mut args = vec![
                "wavetile".to_string(),
                dir.path().display().to_string(),
                "-w".to_string(),
                "4".to_string(),
                "-H".to_string(),
                "4".to_string(),
                "-q".to_string(),
            ];
            args.extend(extra.iter().map(ToString::to_string));
            Cli::try_parse_from(args).expect("parse")
        };

        FileProcessor::new(args(&[])).process().expect("first run");
        let output = output_path(&input);
        let first = std::fs::metadata(&output).expect("output").modified().ok();

        FileProcessor::new(args(&[])).process().expect("second run");
        let second = std::fs::metadata(&output).expect("output").modified().ok();
        assert_eq!(first, second);
        assert!(!dir.path().join("a_result_result.png").exists());
    }

    // Tests non-PNG targets are rejected
    // Verified by accepting any existing file
    #[test]
    fn test_rejects_non_png_target() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "not an image").expect("write");

        let cli = Cli::try_parse_from(["wavetile", input.to_str().expect("utf-8 path"), "-q"])
            .expect("parse");
        assert!(matches!(
            FileProcessor::new(cli).process(),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }

    // Tests a sample without adjacencies stops processing
    // Verified by generating from the empty model
    #[test]
    fn test_single_pixel_sample_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("dot.png");
        RgbImage::from_pixel(1, 1, Rgb([1, 2, 3]))
            .save(&input)
            .expect("save");

        let cli = Cli::try_parse_from(["wavetile", input.to_str().expect("utf-8 path"), "-q"])
            .expect("parse");
        assert!(matches!(
            FileProcessor::new(cli).process(),
            Err(AlgorithmError::EmptySample { .. })
        ));
        assert!(!output_path(&input).exists());
    }

    // Tests out-of-range start cells are rejected before any sample is read
    // Verified by checking starts only when collapsing them
    #[test]
    fn test_start_outside_grid_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("sample.png");
        write_sample(&input);

        let cli = Cli::try_parse_from([
            "wavetile",
            dir.path().to_str().expect("utf-8 path"),
            "-w",
            "4",
            "-H",
            "5",
            "--start",
            "1,1",
            "--start",
            "5,0",
            "-q",
        ])
        .expect("parse");

        match FileProcessor::new(cli).process() {
            Err(AlgorithmError::InvalidParameter {
                parameter, value, ..
            }) => {
                assert_eq!(parameter, "start");
                assert_eq!(value, "5,0");
            }
            other => unreachable!("Expected InvalidParameter, got {other:?}"),
        }
        assert!(!output_path(&input).exists());
    }

    // Tests start cells on the last row and column are accepted
    // Verified by comparing against width and height inclusively
    #[test]
    fn test_start_on_far_edge_accepted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("sample.png");
        write_sample(&input);

        let cli = Cli::try_parse_from([
            "wavetile",
            input.to_str().expect("utf-8 path"),
            "-w",
            "4",
            "-H",
            "5",
            "--start",
            "4,3",
        ])
        .expect("parse");
        FileProcessor::new(cli).process().expect("process");
        assert!(output_path(&input).exists());
    }
}
