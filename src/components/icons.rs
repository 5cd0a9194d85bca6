//! Centralized UI glyph definitions.
//!
//! The glyph set is configured in `config.rs` via `ICON_THEME`. Image icons
//! that swap with the color theme are plain `<img>` files, not glyphs.

use icondata::Icon;

use crate::config::IconTheme;

mod lucide {
    pub use icondata::{
        LuArrowUp as ArrowUp, LuBriefcase as Work, LuCalendar as Calendar, LuCode as Language,
        LuExternalLink as ExternalLink, LuGraduationCap as Education, LuMail as Mail,
        LuMapPin as Location, LuMonitor as System, LuMoon as Moon, LuStar as Star, LuSun as Sun,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowUp as ArrowUp, BsBoxArrowUpRight as ExternalLink, BsBriefcase as Work,
        BsCalendar as Calendar, BsCodeSlash as Language, BsDisplay as System,
        BsEnvelope as Mail, BsGeoAltFill as Location, BsMoonFill as Moon,
        BsMortarboard as Education, BsStarFill as Star, BsSunFill as Sun,
    };
}

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(SUN, Sun);
themed_icon!(MOON, Moon);
themed_icon!(SYSTEM, System);
themed_icon!(ARROW_UP, ArrowUp);
themed_icon!(STAR, Star);
themed_icon!(LANGUAGE, Language);
themed_icon!(CALENDAR, Calendar);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(LOCATION, Location);
themed_icon!(MAIL, Mail);
themed_icon!(WORK, Work);
themed_icon!(EDUCATION, Education);
