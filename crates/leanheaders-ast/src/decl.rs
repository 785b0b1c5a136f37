//! Declaration types

use crate::{Ident, Span, TypeRef};
use serde::{Deserialize, Serialize};

/// A top-level declaration found in a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// Class, category or extension: `@interface Name (Category) : Super <Protos>`
    Class(ClassDecl),

    /// Protocol: `@protocol Name <Protos>`
    Protocol(ProtocolDecl),

    /// Forward declaration: `@class A, B;` or `@protocol P;`
    Forward(ForwardDecl),

    /// Struct: `typedef struct Tag { ... } Alias;`
    Struct(StructDecl),

    /// Enum: `typedef NS_ENUM(NSInteger, Name) { ... };`
    Enum(EnumDecl),

    /// Property: `@property (nonatomic, copy) NSString *name;`
    Property(PropertyDecl),

    /// Method: `- (Ret *)label:(Type *)name;`
    Method(MethodDecl),

    /// Block alias: `typedef void (^Name)(Params);`
    BlockAlias(BlockAliasDecl),

    /// Plain alias: `typedef Existing NewName;`
    Alias(AliasDecl),
}

impl Declaration {
    /// Short human-readable name of the declaration family
    pub fn family(&self) -> &'static str {
        match &self.kind {
            DeclarationKind::Class(class) if class.is_extension => "extension",
            DeclarationKind::Class(class) if class.category.is_some() => "category",
            DeclarationKind::Class(_) => "class",
            DeclarationKind::Protocol(_) => "protocol",
            DeclarationKind::Forward(_) => "forward declaration",
            DeclarationKind::Struct(_) => "struct",
            DeclarationKind::Enum(_) => "enum",
            DeclarationKind::Property(_) => "property",
            DeclarationKind::Method(_) => "method",
            DeclarationKind::BlockAlias(_) => "block alias",
            DeclarationKind::Alias(_) => "alias",
        }
    }

    /// Primary name of the declaration, if it has one
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            DeclarationKind::Class(class) => Some(class.name.as_str()),
            DeclarationKind::Protocol(proto) => Some(proto.name.as_str()),
            DeclarationKind::Forward(_) => None,
            DeclarationKind::Struct(s) => s.name().map(Ident::as_str),
            DeclarationKind::Enum(e) => e.name().map(Ident::as_str),
            DeclarationKind::Property(prop) => Some(prop.name.as_str()),
            DeclarationKind::Method(_) => None,
            DeclarationKind::BlockAlias(alias) => Some(alias.name.as_str()),
            DeclarationKind::Alias(alias) => Some(alias.name.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: Ident,
    /// Lightweight generic parameters: `@interface Box<ObjectType>`
    pub type_params: Vec<Ident>,
    pub superclass: Option<TypeRef>,
    pub protocols: Vec<Ident>,
    /// Category name; empty parentheses make an extension instead
    pub category: Option<Ident>,
    pub is_extension: bool,
    /// Preceded by `NS_ROOT_CLASS` or `__attribute__((objc_root_class))`
    pub root_marked: bool,
}

impl ClassDecl {
    /// Categories and extensions add to an existing class
    pub fn is_category_like(&self) -> bool {
        self.is_extension || self.category.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolDecl {
    pub name: Ident,
    pub protocols: Vec<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForwardKind {
    Class,
    Protocol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardDecl {
    pub kind: ForwardKind,
    pub names: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub tag: Option<Ident>,
    pub alias: Option<Ident>,
    pub is_typedef: bool,
}

impl StructDecl {
    pub fn is_anonymous(&self) -> bool {
        self.tag.is_none()
    }

    /// The name code should use: the alias when present, else the tag
    pub fn name(&self) -> Option<&Ident> {
        self.alias.as_ref().or(self.tag.as_ref())
    }

    /// Distinct names this struct introduces (tag and alias, deduplicated)
    pub fn declared_names(&self) -> Vec<&Ident> {
        let mut names: Vec<&Ident> = self.tag.iter().collect();
        if let Some(alias) = &self.alias {
            if self.tag.as_ref().map(|t| t.name != alias.name).unwrap_or(true) {
                names.push(alias);
            }
        }
        names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnumStyle {
    /// `enum Name { ... }`
    Plain,
    /// `NS_ENUM(Raw, Name)`
    NsEnum,
    /// `NS_OPTIONS(Raw, Name)`
    NsOptions,
    /// `NS_ERROR_ENUM(Domain, Name)`
    NsErrorEnum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub style: EnumStyle,
    pub tag: Option<Ident>,
    /// Name given inside the macro arguments
    pub macro_name: Option<Ident>,
    pub alias: Option<Ident>,
    /// Underlying integer type; recorded, never treated as a reference
    pub raw_type: Option<TypeRef>,
    /// Error domain of `NS_ERROR_ENUM`
    pub domain: Option<Ident>,
    pub is_typedef: bool,
}

impl EnumDecl {
    pub fn is_options_style(&self) -> bool {
        self.style == EnumStyle::NsOptions
    }

    pub fn is_anonymous(&self) -> bool {
        self.tag.is_none() && self.macro_name.is_none()
    }

    /// The name code should use
    pub fn name(&self) -> Option<&Ident> {
        self.macro_name
            .as_ref()
            .or(self.alias.as_ref())
            .or(self.tag.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    /// Name of the enclosing `@interface`/`@protocol`, if any is open
    pub owner: Option<String>,
    pub attributes: Vec<PropertyAttribute>,
    pub ty: TypeRef,
    pub name: Ident,
}

impl PropertyDecl {
    pub fn has_attribute(&self, attribute: &PropertyAttribute) -> bool {
        self.attributes.contains(attribute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyAttribute {
    Class,
    Readonly,
    Readwrite,
    Atomic,
    Nonatomic,
    Assign,
    Retain,
    Copy,
    Weak,
    Strong,
    UnsafeUnretained,
    Nullable,
    Nonnull,
    NullUnspecified,
    NullResettable,
    Getter(String),
    Setter(String),
    /// `IBOutlet`, `IBInspectable`, `IBOutletCollection(...)`
    InterfaceBuilder(String),
    Other(String),
}

impl PropertyAttribute {
    /// Classify a bare attribute word from a property's attribute list
    pub fn from_word(word: &str) -> Self {
        match word {
            "class" => PropertyAttribute::Class,
            "readonly" => PropertyAttribute::Readonly,
            "readwrite" => PropertyAttribute::Readwrite,
            "atomic" => PropertyAttribute::Atomic,
            "nonatomic" | "NS_NONATOMIC_IOSONLY" => PropertyAttribute::Nonatomic,
            "assign" => PropertyAttribute::Assign,
            "retain" => PropertyAttribute::Retain,
            "copy" => PropertyAttribute::Copy,
            "weak" => PropertyAttribute::Weak,
            "strong" => PropertyAttribute::Strong,
            "unsafe_unretained" => PropertyAttribute::UnsafeUnretained,
            "nullable" => PropertyAttribute::Nullable,
            "nonnull" => PropertyAttribute::Nonnull,
            "null_unspecified" => PropertyAttribute::NullUnspecified,
            "null_resettable" => PropertyAttribute::NullResettable,
            other => PropertyAttribute::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub owner: Option<String>,
    /// `+` methods
    pub is_class_method: bool,
    /// Return type; `None` when omitted, which the language reads as `id`
    pub returns: Option<TypeRef>,
    pub selector: Vec<SelectorPart>,
    /// Trailing `, ...`
    pub variadic: bool,
}

impl MethodDecl {
    /// Full selector: `initWith:onClose:`
    pub fn selector_name(&self) -> String {
        let mut name = String::new();
        for part in &self.selector {
            if let Some(label) = &part.label {
                name.push_str(&label.name);
            }
            if part.param.is_some() {
                name.push(':');
            }
        }
        name
    }

    pub fn params(&self) -> impl Iterator<Item = &MethodParam> {
        self.selector.iter().filter_map(|part| part.param.as_ref())
    }
}

/// One `label:(Type)name` segment of a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPart {
    /// Absent for anonymous segments: `:(id)sender`
    pub label: Option<Ident>,
    pub param: Option<MethodParam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParam {
    /// `None` when omitted: `- (void)take:value;`
    pub ty: Option<TypeRef>,
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAliasDecl {
    pub name: Ident,
    /// Always a block type
    pub signature: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDecl {
    pub name: Ident,
    pub target: TypeRef,
}
