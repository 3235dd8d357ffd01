//! End-to-end tests: config file + overrides + input stream -> frames.

#![allow(clippy::unwrap_used)]

use std::io::{Cursor, Write};

use trueno_plot::chart::strip_ansi;
use trueno_plot::color::Color;
use trueno_plot::config::{Config, Overrides};
use trueno_plot::plotter::Plotter;

fn batch_frame(config: Config, cols: usize, input: &str) -> String {
    let mut plotter = Plotter::new(config, cols).unwrap();
    let mut out = Vec::new();
    plotter.run(Cursor::new(input.to_string()), &mut out, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_config_file_then_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rows: 3\nprecision: 0\ncolors: [red]\ntitle: from file").unwrap();

    let overrides = Overrides { title: Some("load".to_string()), batch: true, ..Overrides::default() };
    let config = Config::load(file.path()).unwrap().with_overrides(&overrides).unwrap();

    assert_eq!(config.series_color(0), Color::Red);

    let frame = batch_frame(config, 5, "0\n1\n2\n");
    let plain = strip_ansi(&frame);
    let lines: Vec<&str> = plain.lines().collect();

    assert_eq!(lines[0], "load");
    assert_eq!(&lines[1..4], &["2 ┤  ╭ ", "1 ┤ ╭╯ ", "0 ┤─╯  "]);
    assert!(frame.contains("\x1b[31m"));
}

#[test]
fn test_two_series_from_csv() {
    let overrides = Overrides {
        rows: Some(3),
        series: Some(2),
        precision: Some(0),
        batch: true,
        no_color: true,
        ..Overrides::default()
    };
    let config = Config::new().with_overrides(&overrides).unwrap();

    let frame = batch_frame(config, 4, "0,2\n1,1\n2,0\n");
    let lines: Vec<&str> = frame.lines().collect();

    assert_eq!(&lines[..3], &["2 ┤─╮╭", "1 ┤ ├┤", "0 ┤─╯╰"]);
    assert_eq!(lines[3], "[0] last=2 min=0 max=2 avg=1 std=1 dropped=0");
    assert_eq!(lines[4], "[1] last=0 min=0 max=2 avg=1 std=1 dropped=0");
}

#[test]
fn test_garbage_lines_are_dropped_not_fatal() {
    let overrides =
        Overrides { rows: Some(2), precision: Some(1), batch: true, no_color: true, ..Overrides::default() };
    let config = Config::new().with_overrides(&overrides).unwrap();

    let frame = batch_frame(config, 6, "1\noops\n\n3\n");
    let footer = frame.lines().last().unwrap();

    assert_eq!(footer, "[0] last=3.0 min=1.0 max=3.0 avg=2.0 std=1.4 dropped=1");
}

#[test]
fn test_fixed_range_labels() {
    let overrides = Overrides {
        rows: Some(5),
        min: Some(-10.0),
        max: Some(10.0),
        precision: Some(0),
        batch: true,
        ..Overrides::default()
    };
    let config = Config::new().with_overrides(&overrides).unwrap();

    let frame = strip_ansi(&batch_frame(config, 4, "0\n"));
    let labels: Vec<&str> = frame.lines().take(5).map(|l| l.split('┤').next().unwrap()).collect();

    assert_eq!(labels, vec![" 10 ", "  5 ", "  0 ", " -5 ", "-10 "]);
}
