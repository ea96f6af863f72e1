//! Static config file payloads, written verbatim

/// Opaque file content keyed by the path it is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPayload {
    /// Relative to the current workflow directory
    pub path: &'static str,
    pub contents: &'static [u8],
}

pub const TAILWIND_CONFIG: StaticPayload = StaticPayload {
    path: "tailwind.config.js",
    contents: br#"/** @type {import('tailwindcss').Config} */
export default {
  content: [
    "./index.html",
    "./src/**/*.{js,ts,jsx,tsx}",
  ],
  theme: {
    extend: {},
  },
  plugins: [],
}
"#,
};

pub const TAILWIND_CONFIG_DAISYUI: StaticPayload = StaticPayload {
    path: "tailwind.config.js",
    contents: br#"/** @type {import('tailwindcss').Config} */
export default {
  content: [
    "./index.html",
    "./src/**/*.{js,ts,jsx,tsx}",
  ],
  theme: {
    extend: {},
  },
  plugins: [
    require('daisyui'),
  ],
}
"#,
};

pub const INDEX_CSS: StaticPayload = StaticPayload {
    path: "src/index.css",
    contents: b"@tailwind base;\n@tailwind components;\n@tailwind utilities;\n",
};

pub const ENV_FILE: StaticPayload = StaticPayload {
    path: ".env",
    contents: b"PORT=3000\n",
};

/// Destination for the fetched database compose file
pub const COMPOSE_FILE_PATH: &str = "docker-compose.yml";

#[cfg(test)]
mod tests {
    use super::*;

    fn text(payload: &StaticPayload) -> &str {
        std::str::from_utf8(payload.contents).unwrap()
    }

    #[test]
    fn test_daisyui_config_registers_plugin() {
        assert!(text(&TAILWIND_CONFIG_DAISYUI).contains("require('daisyui')"));
        assert!(!text(&TAILWIND_CONFIG).contains("daisyui"));
        assert_eq!(TAILWIND_CONFIG.path, TAILWIND_CONFIG_DAISYUI.path);
    }

    #[test]
    fn test_index_css_has_tailwind_directives() {
        let css = text(&INDEX_CSS);
        for directive in ["@tailwind base;", "@tailwind components;", "@tailwind utilities;"] {
            assert!(css.lines().any(|l| l == directive), "missing {}", directive);
        }
    }
}
