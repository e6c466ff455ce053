/// 片段渲染
pub mod components;
/// 数据加载
pub mod data;
/// 导航交互
pub mod navigation;
/// 页面编排
pub mod page;
