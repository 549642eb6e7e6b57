use crate::foundation::core::Rgba8;

/// Parse a CSS color value as used in theme variables.
///
/// Accepted forms: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`,
/// `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`. Channel values are clamped.
pub fn parse_css_color(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    let (name, args) = lower
        .split_once('(')
        .ok_or_else(|| format!("unsupported color \"{s}\""))?;
    let args = args
        .strip_suffix(')')
        .ok_or_else(|| format!("unterminated color function \"{s}\""))?;
    let parts: Vec<&str> = args
        .split([',', '/', ' '])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match (name.trim(), parts.len()) {
        ("rgb" | "rgba", 3 | 4) => {
            let r = parse_channel(parts[0])?;
            let g = parse_channel(parts[1])?;
            let b = parse_channel(parts[2])?;
            let a = match parts.get(3) {
                Some(p) => parse_alpha(p)?,
                None => 255,
            };
            Ok(Rgba8::new(r, g, b, a))
        }
        ("hsl" | "hsla", 3 | 4) => {
            let h = parse_number(parts[0].trim_end_matches("deg"))?;
            let sat = parse_percent(parts[1])?;
            let l = parse_percent(parts[2])?;
            let a = match parts.get(3) {
                Some(p) => parse_alpha(p)?,
                None => 255,
            };
            let (r, g, b) = hsl_to_rgb(h, sat, l);
            Ok(Rgba8::new(to_u8(r), to_u8(g), to_u8(b), a))
        }
        _ => Err(format!("unsupported color \"{s}\"")),
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"#{s}\""));
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in s.chars().enumerate() {
                let d = c
                    .to_digit(16)
                    .ok_or_else(|| format!("invalid hex digit '{c}'"))? as u8;
                out[i] = d * 17;
            }
            Ok(Rgba8::new(out[0], out[1], out[2], 255))
        }
        6 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid number \"{s}\""))
}

fn parse_percent(s: &str) -> Result<f64, String> {
    let v = parse_number(s.trim_end_matches('%'))?;
    Ok((v / 100.0).clamp(0.0, 1.0))
}

fn parse_channel(s: &str) -> Result<u8, String> {
    if s.ends_with('%') {
        return Ok(to_u8(parse_percent(s)?));
    }
    Ok(parse_number(s)?.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: &str) -> Result<u8, String> {
    let a = if s.ends_with('%') {
        parse_percent(s)?
    } else {
        parse_number(s)?.clamp(0.0, 1.0)
    };
    Ok(to_u8(a))
}

fn to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
