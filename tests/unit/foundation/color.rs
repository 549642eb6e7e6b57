use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css_color("#ff0000").unwrap(), Rgba8::new(255, 0, 0, 255));
    assert_eq!(parse_css_color("#0000ff80").unwrap(), Rgba8::new(0, 0, 255, 128));
    assert_eq!(parse_css_color("#fff").unwrap(), Rgba8::new(255, 255, 255, 255));
}

#[test]
fn parses_rgba_function_with_fractional_alpha() {
    let c = parse_css_color(" rgba(255, 255, 255, 0.6) ").unwrap();
    assert_eq!(c, Rgba8::new(255, 255, 255, 153));

    let c = parse_css_color("rgb(30 30 30)").unwrap();
    assert_eq!(c, Rgba8::new(30, 30, 30, 255));
}

#[test]
fn parses_hsl_red() {
    let c = parse_css_color("hsl(0, 100%, 50%)").unwrap();
    assert_eq!(c, Rgba8::new(255, 0, 0, 255));
}

#[test]
fn rejects_garbage() {
    assert!(parse_css_color("").is_err());
    assert!(parse_css_color("tomato").is_err());
    assert!(parse_css_color("rgba(1, 2)").is_err());
    assert!(parse_css_color("#12345").is_err());
}

#[test]
fn multibyte_hex_digits_are_rejected() {
    assert!(parse_css_color("#aü123").is_err());
    assert!(parse_css_color("#ffé").is_err());
    assert!(parse_css_color("#00ff00ü").is_err());
}
