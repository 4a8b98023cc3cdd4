use crate::interpreter::{
    context::Context,
    token::{Arity, Associativity, FunctionFn},
};

/// The binary operator whose callback and precedence the juxtaposition
/// operator is derived from.
pub const JUXTAPOSITION_REFERENCE: &str = "&";

/// Precedence of the prefix operators.
pub const UNARY_PRECEDENCE: i32 = 10;
/// Precedence of `==` and `!=`.
pub const EQUALITY_PRECEDENCE: i32 = 8;
/// Precedence of AND.
pub const AND_PRECEDENCE: i32 = 6;
/// Precedence of XOR.
pub const XOR_PRECEDENCE: i32 = 4;
/// Precedence of OR.
pub const OR_PRECEDENCE: i32 = 2;

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin,
/// - the title and usage shown by listings.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr,
                title: $title:literal,
                usage: $usage:literal $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  FunctionFn,
            title: &'static str,
            usage: &'static str,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func, title: $title, usage: $usage },
            )*
        ];
    };
}

builtin_functions! {
    "NOT"  => { arity: Arity::Exact(1), func: |args| !args[0],              title: "Not",  usage: "NOT(x)" },
    "OR"   => { arity: Arity::Exact(2), func: |args| args[0] | args[1],     title: "Or",   usage: "OR(x, y)" },
    "AND"  => { arity: Arity::Exact(2), func: |args| args[0] & args[1],     title: "And",  usage: "AND(x, y)" },
    "XOR"  => { arity: Arity::Exact(2), func: |args| args[0] ^ args[1],     title: "Xor",  usage: "XOR(x, y)" },
    "NOR"  => { arity: Arity::Exact(2), func: |args| !(args[0] | args[1]),  title: "Nor",  usage: "NOR(x, y)" },
    "NAND" => { arity: Arity::Exact(2), func: |args| !(args[0] & args[1]),  title: "Nand", usage: "NAND(x, y)" },
    "XNOR" => { arity: Arity::Exact(2), func: |args| !(args[0] ^ args[1]),  title: "Xnor", usage: "XNOR(x, y)" },
}

const fn not(x: bool) -> bool {
    !x
}

const fn and(x: bool, y: bool) -> bool {
    x & y
}

const fn or(x: bool, y: bool) -> bool {
    x | y
}

const fn xor(x: bool, y: bool) -> bool {
    x ^ y
}

const fn equals(x: bool, y: bool) -> bool {
    x == y
}

const fn not_equals(x: bool, y: bool) -> bool {
    x != y
}

/// Installs the builtin operators, functions and constants.
///
/// AND binds tighter than XOR, which binds tighter than OR. The arithmetic
/// spellings `*`, `/` and `+` are aliases of `&`, `^` and `|`.
pub fn install(context: &mut Context) {
    use Associativity::{Any, Left, Right};

    context.register_unary('!', not, UNARY_PRECEDENCE, Right, "Not", "!x");
    context.register_unary('~', not, UNARY_PRECEDENCE, Right, "Not", "~x");

    context.register_binary("==", equals, EQUALITY_PRECEDENCE, Left, "Equals", "x == y");
    context.register_binary("!=", not_equals, EQUALITY_PRECEDENCE, Left, "Not equals", "x != y");
    context.register_binary("&", and, AND_PRECEDENCE, Any, "Bitwise AND", "x & y");
    context.register_binary("^", xor, XOR_PRECEDENCE, Any, "Bitwise XOR", "x ^ y");
    context.register_binary("|", or, OR_PRECEDENCE, Any, "Bitwise OR", "x | y");
    context.register_binary("*", and, AND_PRECEDENCE, Any, "Bitwise AND", "x * y");
    context.register_binary("/", xor, XOR_PRECEDENCE, Any, "Bitwise XOR", "x / y");
    context.register_binary("+", or, OR_PRECEDENCE, Any, "Bitwise OR", "x + y");

    for def in BUILTIN_TABLE {
        context.register_function(def.name, def.func, def.arity, def.title, def.usage);
    }

    for (name, value, title) in [("true", true, "True"),
                                 ("T", true, "True"),
                                 ("false", false, "False"),
                                 ("F", false, "False"),
                                 ("high", true, "High"),
                                 ("H", true, "High"),
                                 ("low", false, "Low"),
                                 ("L", false, "Low")]
    {
        context.register_constant(name, value, title, "Boolean value");
    }
}
