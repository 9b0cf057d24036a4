pub mod settings;

pub use settings::{
    BreakpointSetting, CarouselKind, CarouselSection, CarouselSettings,
    GestureSection, GlideSection, ModeSetting, SettingsSource, SpringSection,
};
