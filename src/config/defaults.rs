pub(super) const fn default_volume() -> f32 {
    0.3
}

pub(super) fn default_opener() -> String {
    "xdg-open".to_string()
}

pub(super) fn default_appname() -> String {
    "Achievement".to_string()
}

pub(super) fn default_hint() -> String {
    "Koleksiyonlarınızı görüntülemek için tıklayın".to_string()
}
