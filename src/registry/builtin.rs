//! Lists every process registers at startup, in registration order.

use crate::registry::Registry;

pub const BUILTIN_LISTS: &[&str] = &[
    "FM|Num|Int|Dollar|Ord|Range|Pair|Nums|Member|Set|Str|Strs|Upper|",
    "Ct:ConnectType|Data|Event|Action|Queue|DB|SQL:SQLite|Remote|Retail|",
    "Lt:ListType|Dt:DataType|Ev:Event|Ac:Action|Rt:Return|Td:TileDef|Ts:TileSize|Pr:Process|Mt:MessageType|Lg:Language|",
    "Dt:DataType|String:Free format string|Integer:Whole Number|Number:Whole or Real Number|",
    "Ev:Event|Click|Enter|Exit|DblClick|Swipe|Drop|Drag|",
    "Rt:Return|Ok|Fail|Equal|Unequal|Queue|",
    "Td:TileDef|Tile|LnEdit|TxtEdit|Btn|Img|Video|",
    "Ts:TileSize|Fixed|T:Top|TL:Top Left|TR:Top Right|B:Bottom|BL:Bottom Left|BR:Bottom Right|L:Left|R:Right|SH:Shared|",
    "Pr:Process|Init|Read|Set|Clear|Default|",
    "Mt:MessageType|Input|Output|Event|Trigger|Action|",
    "Ac:Action|Init|Timer|Login|Logout|",
    "Lg:Language|En:English|Es:Espanol|Cn:Chinese|",
    "Cy:Country|US:United States|UK:United Kingdom|CA:Canada|RU:Russia|IN:India|",
    "Test|NameF:[%12]First Name|XY:[P]XY Dim|Cost:[$]Dollar Price|",
];

impl Registry {
    /// A registry holding [`BUILTIN_LISTS`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.add_all(BUILTIN_LISTS);
        registry
    }
}
