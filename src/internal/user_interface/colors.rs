use lazy_static::lazy_static;

lazy_static! {
    static ref ENABLE_COLORS: bool = std::env::var_os("NO_COLOR").is_none();
}

pub trait StringColor {
    fn colorize(&self, code: &str) -> String;

    fn bold(&self) -> String {
        self.colorize("1")
    }

    fn red(&self) -> String {
        self.colorize("31")
    }

    fn yellow(&self) -> String {
        self.colorize("33")
    }

    fn light_black(&self) -> String {
        self.colorize("90")
    }

    fn light_blue(&self) -> String {
        self.colorize("94")
    }

    fn light_cyan(&self) -> String {
        self.colorize("96")
    }
}

impl<T: AsRef<str> + ?Sized> StringColor for T {
    fn colorize(&self, code: &str) -> String {
        let text = self.as_ref();
        if *ENABLE_COLORS {
            format!("\x1B[{code}m{text}\x1B[0m")
        } else {
            text.to_string()
        }
    }
}
